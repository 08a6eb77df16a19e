use clap::{Arg, ArgAction, Command};
use calcsites_core::{init_tracing, Context, Pipeline, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("calcsites-deploy")
        .version("0.1.0")
        .about("Deploy every generated site directory with the Netlify CLI")
        .author("Calculator Pro Team")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Directory whose subdirectories are deployed")
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Log the deploy commands without running them")
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the batch summary as JSON")
        )
        .get_matches();

    let mut ctx = Context::load()?;

    if let Some(dir) = matches.get_one::<String>("output") {
        ctx.output_dir = PathBuf::from(dir);
    }
    if matches.get_flag("dry-run") {
        ctx.dry_run = true;
    }

    init_tracing(ctx.debug > 0);

    if ctx.ctx_out {
        info!("Context: {:?}", ctx);
    }

    info!("Netlify deployment tool");

    let pipeline = Pipeline::from_context(&ctx);

    if !ctx.dry_run {
        if let Err(err) = pipeline.deployer().ensure_cli().await {
            warn!("✗ {}, each site will be counted as failed", err);
        }
    }

    let summary = match pipeline.deploy_existing().await {
        Ok(summary) => summary,
        Err(err) => {
            error!("✗ Failed to list sites under '{}': {}", ctx.output_dir.display(), err);
            return Ok(());
        }
    };
    summary.log(pipeline.output_dir());

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
