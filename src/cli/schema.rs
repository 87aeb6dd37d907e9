use crate::cli::SchemaArgs;
use crate::config::Config;
use crate::trip::TripRequest;
use schemars::schema_for;

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = if args.trip {
        schema_for!(TripRequest)
    } else {
        schema_for!(Config)
    };
    let json = serde_json::to_string_pretty(&schema)?;
    println!("{}", json);
    Ok(())
}
