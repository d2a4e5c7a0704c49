pub mod charts;
pub mod dispatcher;
pub mod panes;
pub mod render;
pub mod view;

pub use dispatcher::{
    begin, dispatch, finish, read_model, read_ticker, DispatchOutcome, PendingRequest,
};
pub use render::{render_payload, show_error};
pub use view::{ModelOptions, TriggerControl, ViewState};
