use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = build_cleanup::cli::parse();
    app::run(args)
}
