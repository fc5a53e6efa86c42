//! pluginlink - annotate a plugin listing with reference links
//!
//! Renders one pass over the plugins given on the command line, the way the
//! admin plugin screen would, and prints each plugin's meta list.

use std::process;

use clap::Parser;
use log::{debug, error};
use serde_json::json;

use pluginlink::cli::Cli;
use pluginlink::config::Settings;
use pluginlink::hooks::Hooks;
use pluginlink::pass::{NoticeLevel, RenderPass};

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    let provider = settings.build_provider(Hooks::default());
    let pass = RenderPass::begin(&provider, &settings.pass).await;
    debug!(
        "dataset source: {:?}, {} linked plugins",
        pass.source(),
        pass.linked_count()
    );

    for notice in pass.notices() {
        match notice.level {
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }

    let rows: Vec<(String, Vec<String>)> = settings
        .plugins
        .iter()
        .map(|plugin| (plugin.clone(), pass.annotate(plugin, Vec::new())))
        .collect();

    if settings.json {
        let rows: Vec<_> = rows
            .iter()
            .map(|(plugin, meta)| json!({ "plugin": plugin, "meta": meta }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for (plugin, meta) in &rows {
            println!("{}\t{}", plugin, meta.join(" | "));
        }
    }

    Ok(())
}
