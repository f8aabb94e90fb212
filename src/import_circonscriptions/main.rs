//! Import French legislative constituency boundaries from a GeoJSON file.
//!
//! Features sharing a `REF` property are unioned into one `FRCIR` area
//! carrying a `ref-cir` code.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bornes::db;
use bornes::import::{self, AreaSpec, ImportRefs};
use bornes::sources;

#[derive(Parser, Debug)]
#[command(name = "import_circonscriptions")]
#[command(about = "Import circonscriptions législatives boundaries from GeoJSON")]
struct Args {
    /// The circonscriptions législatives GeoJSON filename
    file: PathBuf,

    /// Which generation ID should be used
    #[arg(long)]
    generation_id: i32,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Actually update the database
    #[arg(long)]
    commit: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    info!("Importing circonscriptions from {}", args.file.display());

    let pool = db::connect(&args.database_url).await?;
    db::refs::generation(&pool, args.generation_id).await?;
    let country = db::refs::country(&pool, "FR").await?;
    let area_type = db::refs::area_type(&pool, "FRCIR").await?;
    let code_type = db::refs::code_type(&pool, "ref-cir").await?;

    let features = sources::geojson::read_features(&args.file)?;
    let groups = import::group_features(features, |feature| {
        let reference = feature.attribute("REF")?;
        Ok(AreaSpec {
            code: reference.to_string(),
            name: reference.to_string(),
        })
    })?;
    info!("{} constituencies to import", groups.len());

    let refs = ImportRefs {
        country_id: country.id,
        area_type_id: area_type.id,
        code_type_id: code_type.id,
    };
    import::run_import(&pool, refs, args.generation_id, groups, args.commit).await?;

    Ok(())
}
