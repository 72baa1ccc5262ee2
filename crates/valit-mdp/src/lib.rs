mod builder;
mod compiled;
mod error;
mod io;
mod simulator;
mod spec;

pub use builder::MdpBuilder;
pub use compiled::{CompiledMdp, StateKey};
pub use error::MdpError;
pub use io::{compile_yaml, load_yaml, parse_yaml, save_yaml};
pub use simulator::MdpSimulator;
pub use spec::{MdpSpec, NextSpec, TransitionSpec};
