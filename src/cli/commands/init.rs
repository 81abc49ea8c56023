use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
        println!("Model files are expected at:");
        for slot in Config::default().classifiers.slots() {
            println!("  {:<20} {}", slot.name, slot.path);
        }
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}
