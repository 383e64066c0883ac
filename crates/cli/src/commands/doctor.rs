//! Doctor command - validate configuration and check node availability

use anyhow::Result;
use permapress_domain::ContentStore;
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::commands::{connect_node, effective_settings, open_store};
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    record_store: CheckResult,
    node: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let (config, config_check) = match AppConfig::load(config_path.as_deref()) {
        Ok(config) => (config, CheckResult::ok("Configuration loaded")),
        Err(e) => (AppConfig::default(), CheckResult::error(e.to_string())),
    };

    let (store_check, node_check) = match open_store(&config).await {
        Ok(store) => {
            let store_check = CheckResult::ok(format!(
                "Record store at {}",
                config.general.data_dir.display()
            ));
            let node_check = match effective_settings(&config, &store).await {
                Ok(settings) => {
                    let node = connect_node(&settings);
                    if node.is_available().await {
                        CheckResult::ok(format!("Node reachable at {}", settings.api_endpoint))
                    } else {
                        CheckResult::error(format!(
                            "Node unreachable at {}",
                            settings.api_endpoint
                        ))
                    }
                }
                Err(e) => CheckResult::error(e.to_string()),
            };
            (store_check, node_check)
        }
        Err(e) => (
            CheckResult::error(e.to_string()),
            CheckResult::error("Skipped: record store unavailable"),
        ),
    };

    let all_ok = config_check.is_ok() && store_check.is_ok() && node_check.is_ok();
    let report = DoctorReport {
        config: config_check,
        record_store: store_check,
        node: node_check,
        overall: if all_ok { "ok" } else { "error" }.to_string(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_check("config", &report.config);
        print_check("record store", &report.record_store);
        print_check("node", &report.node);
        println!("Overall: {}", report.overall);
    }

    if all_ok {
        Ok(())
    } else {
        anyhow::bail!("Doctor found problems")
    }
}

fn print_check(name: &str, check: &CheckResult) {
    println!("[{}] {}: {}", check.status, name, check.message);
}
