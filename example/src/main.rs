fn main() -> anyhow::Result<()> {
    radial_progress_example::desktop_main()
}
