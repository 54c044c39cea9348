use openhours_core::importer;

pub fn run(expression: &str) -> Result<(), Box<dyn std::error::Error>> {
    let def = importer::parse(expression)?;
    println!("{}", serde_json::to_string_pretty(&def)?);
    Ok(())
}
