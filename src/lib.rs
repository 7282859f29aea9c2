pub mod argsets;
pub mod bus_mgmt;
pub mod command;
pub mod constants;
pub mod emit;

mod helpers;
