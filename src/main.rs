use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    let args = tally_import::args::parse();
    tally_import::cli::main(args)
}
