use super::common::{Common, CommonArgs};
use camino::Utf8PathBuf;
use clap::Parser;
use fueleu_audit::Result;
use fueleu_audit::fleet::{FleetStore, ImoNumber, JsonStore, LookupResult, MemoryStore, resolve};
use fueleu_audit::metrics::assess;
use fueleu_audit::reports::generate_console;
use ohno::IntoAppError;
use serde_json::json;

#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// IMO number of the ship to audit
    #[arg(value_name = "IMO", value_parser = parse_imo)]
    pub imo: ImoNumber,

    /// Path to a JSON fleet file to search instead of the embedded demo fleet
    #[arg(long, value_name = "PATH")]
    pub fleet: Option<Utf8PathBuf>,

    /// Print the resolved record and derived metrics as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn parse_imo(s: &str) -> std::result::Result<ImoNumber, Box<dyn std::error::Error + Send + Sync + 'static>> {
    ImoNumber::parse(s).map_err(ohno::AppError::into_std_error)
}

pub fn lookup_ship(args: &LookupArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    let store: Box<dyn FleetStore> = match &args.fleet {
        Some(path) => Box::new(JsonStore::open(path)?),
        None => Box::new(MemoryStore::builtin()?),
    };

    match resolve(store.as_ref(), &args.imo)? {
        LookupResult::NotFound => {
            eprintln!("Ship not found (check the IMO number): {}", args.imo);
            std::process::exit(1);
        }
        LookupResult::Found(record) => {
            let metrics = assess(&record, &common.config);

            if args.json {
                let payload = json!({ "imo": args.imo, "record": record, "metrics": metrics });
                let text = serde_json::to_string_pretty(&payload).into_app_err("serializing lookup result")?;
                println!("{text}");
            } else {
                let mut output = String::new();
                generate_console(&args.imo, &record, &metrics, common.color, &mut output)?;
                print!("{output}");
            }
            Ok(())
        }
    }
}
