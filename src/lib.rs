#![forbid(unsafe_code)]

pub mod draw;
pub mod error;
pub mod generate;
pub mod intake;
pub mod metrics;
pub mod notify;
pub mod pages;
pub mod pdf;
pub mod plan;
pub mod quotes;
pub mod render;
pub mod theme;

pub use error::{PlanpressError, PlanpressResult};
pub use intake::Intake;
pub use plan::{Phase, Plan, Week, WorkoutType};
pub use quotes::QuoteBook;
pub use render::{RenderOptions, render_plan, render_plan_to_file};
