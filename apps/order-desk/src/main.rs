//! # Order Desk Entry Point

use std::process::ExitCode;

fn main() -> ExitCode {
    order_desk::run()
}
