mod helpers;
mod tools_flow;
mod transport_flow;
