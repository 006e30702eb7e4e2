use verstamp::Version;

#[verstamp::main]
fn main() -> anyhow::Result<()> {
    println!("version: {}", verstamp::get_version());
    println!("parsed: {}", Version::current()?);

    Ok(())
}
