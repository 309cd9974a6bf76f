pub mod jsonrpc;
pub mod router;
pub mod stdio;
pub mod tools;
