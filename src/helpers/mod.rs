mod load_dotenv;
mod time;

pub use load_dotenv::load_dotenv;
pub use time::{now_local, time_label, time_label_from_millis, wall_clock};
