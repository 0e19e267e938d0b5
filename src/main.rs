use log::*;

mod account;
mod account_registry;
mod bank_demo;
mod errors;
mod passbook;
mod records;

use bank_demo::BankDemo;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let demo = BankDemo::default();
    info!("Running bank demo");

    demo.run()
}
