fn main() -> anyhow::Result<()> {
    rimcomplete::cli::run()
}
