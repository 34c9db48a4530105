pub mod agent_config;
pub mod run_report;
