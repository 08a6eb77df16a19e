use clap::{value_parser, Arg, ArgAction, Command};
use calcsites_core::render::PageLayout;
use calcsites_core::{init_tracing, Context, Pipeline, Result};
use std::path::PathBuf;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("calcsites")
        .version("0.1.0")
        .about("Generate a calculator site per keyword and deploy each one")
        .author("Calculator Pro Team")
        .arg(
            Arg::new("keywords")
                .short('k')
                .long("keywords")
                .value_name("FILE")
                .help("Keyword file, first line is a header")
        )
        .arg(
            Arg::new("max")
                .short('n')
                .long("max")
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .help("Maximum number of keywords to process")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Directory receiving one bundle per keyword")
        )
        .arg(
            Arg::new("templates")
                .short('t')
                .long("templates")
                .value_name("DIR")
                .help("Directory holding privacy/terms/contact/about pages")
        )
        .arg(
            Arg::new("layout")
                .long("layout")
                .value_name("LAYOUT")
                .value_parser(["index", "slug"])
                .help("index: index.html + style.css, slug: <slug>.html + calculator-style.css")
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Generate bundles but only log the deploy commands")
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the batch summary as JSON")
        )
        .get_matches();

    let start_time = std::time::Instant::now();
    let mut ctx = Context::load()?;

    // Command line wins over environment
    if let Some(file) = matches.get_one::<String>("keywords") {
        ctx.keywords_file = PathBuf::from(file);
    }
    if let Some(max) = matches.get_one::<usize>("max") {
        ctx.max_keywords = *max;
    }
    if let Some(dir) = matches.get_one::<String>("output") {
        ctx.output_dir = PathBuf::from(dir);
    }
    if let Some(dir) = matches.get_one::<String>("templates") {
        ctx.templates_dir = PathBuf::from(dir);
    }
    if let Some(layout) = matches.get_one::<String>("layout") {
        ctx.layout = layout.parse::<PageLayout>()?;
    }
    if matches.get_flag("dry-run") {
        ctx.dry_run = true;
    }

    init_tracing(ctx.debug > 0);

    if ctx.ctx_out {
        info!("Context: {:?}", ctx);
    }

    info!("Calculator site generator and deployer");

    let pipeline = Pipeline::from_context(&ctx);

    if !ctx.dry_run {
        if let Err(err) = pipeline.deployer().ensure_cli().await {
            warn!("✗ {}, bundles are still generated", err);
        }
    }

    let summary = pipeline.run().await;
    summary.log(pipeline.output_dir());
    info!("Finished in {:?}", start_time.elapsed());

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
