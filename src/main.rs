use postrun::entry;
use postrun::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
