mod config_cmd;
mod remote;
mod session;

pub use config_cmd::ConfigCommand;
pub use remote::RemoteCommand;
pub use session::SessionCommand;
