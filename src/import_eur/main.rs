//! Derive French European Parliament constituency boundaries by unioning
//! department polygons through the static department table.
//!
//! Each department shape is assigned to its constituency via the
//! `code_insee` attribute; the eight resulting groups become `FREUR` areas
//! carrying an `eur` slug code.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bornes::db;
use bornes::eur::{self, Constituency};
use bornes::import::{self, AreaSpec, ImportRefs};
use bornes::sources;

#[derive(Parser, Debug)]
#[command(name = "import_eur")]
#[command(about = "Assemble European Parliament constituency boundaries from a departments shapefile")]
struct Args {
    /// The départements shapefile filename
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
    info!(
        "Assembling European constituencies from {}",
        args.file.display()
    );

    let pool = db::connect(&args.database_url).await?;
    db::refs::generation(&pool, args.generation_id).await?;
    let country = db::refs::country(&pool, "FR").await?;
    let area_type = db::refs::get_or_create_area_type(
        &pool,
        "FREUR",
        "French European Parliament constituency",
    )
    .await?;
    let code_type = db::refs::get_or_create_code_type(
        &pool,
        "eur",
        "Slug of French European Parliament constituency name",
    )
    .await?;

    let features = sources::shapefile::read_features(&args.file)?;
    let groups = import::group_features(features, |feature| {
        let insee = feature.attribute("code_insee")?;
        let constituency = Constituency::for_department(eur::normalize_insee(insee))?;
        Ok(AreaSpec {
            code: constituency.slug().to_string(),
            name: constituency.name().to_string(),
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
