use reqres_contract::config::SuiteConfig;
use reqres_contract::init_logging;
use reqres_contract::runner::ScenarioRunner;

#[tokio::main]
async fn main() {
    let config = match SuiteConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("reqres-contract: configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level);

    let runner = match ScenarioRunner::from_config(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("reqres-contract: setup error: {e}");
            std::process::exit(1);
        }
    };

    let selected = ScenarioRunner::select(config.scenario_filter.as_deref());
    let report = runner.run(&selected).await;

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("reqres-contract: cannot serialize report: {e}");
            std::process::exit(1);
        }
    }

    if !report.is_success() {
        std::process::exit(1);
    }
}
