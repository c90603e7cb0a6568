use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge, CounterVec, Gauge};

lazy_static! {
    pub static ref ADMIN_ACTIONS_COUNTER: CounterVec = register_counter_vec!(
        "api_admin_actions_total",
        "Admin actions by action name and status",
        &["action", "status"]
    ).unwrap();

    pub static ref LIVE_TRANSITIONS_COUNTER: CounterVec = register_counter_vec!(
        "api_live_transitions_total",
        "Live pointer transitions by kind (display/advance/stop)",
        &["kind"]
    ).unwrap();

    pub static ref AI_CALLS_COUNTER: CounterVec = register_counter_vec!(
        "api_ai_calls_total",
        "Hosted-AI calls by flow and outcome",
        &["flow", "status"]
    ).unwrap();

    pub static ref DISPLAY_CLIENTS_GAUGE: Gauge = register_gauge!(
        "api_display_clients",
        "Currently connected display WebSocket clients"
    ).unwrap();
}
