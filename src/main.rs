fn main() -> anyhow::Result<()> {
    // flushes buffered records on exit when async logging is on
    let _guard = frontmvc::logging::init_logging()?;
    frontmvc::cli::run_cli()
}
