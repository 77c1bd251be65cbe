use taskgrid_policy::PolicyKind;

pub fn list() -> anyhow::Result<()> {
    for kind in PolicyKind::ALL {
        let marker = if kind == PolicyKind::default() { " (default)" } else { "" };
        println!("{kind}{marker}");
    }
    Ok(())
}
