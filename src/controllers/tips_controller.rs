use chrono::Local;

use crate::{AppState, services::tips};

pub fn get_tip<P>(state: &AppState<P>) -> String {
    format!("\n{}\n", tips::get_tip(state.settings.language, Local::now()))
}
