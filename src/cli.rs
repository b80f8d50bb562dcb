use range_picker::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
