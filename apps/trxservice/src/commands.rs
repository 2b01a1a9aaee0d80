use alloy::primitives::U256;
use anyhow::{Context, Result};
use tron::{BalanceService, ContractCallResult, ContractClient, TronGrpc};

#[derive(clap::Subcommand)]
pub enum Command {
    /// TRX balance of an account, in sun.
    Balance { address: String },

    /// TRC20 balance of `holder` on `contract`, in token base units.
    TokenBalance { holder: String, contract: String },

    /// TRC20 name, symbol and decimals.
    TokenInfo { contract: String },

    /// Build an unsigned TRC20 transfer and print its txid and raw data.
    SendToken {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        contract: String,
        /// Token base units, decimal or 0x-hex.
        #[arg(long)]
        amount: String,
        #[arg(long, default_value_t = 0)]
        fee_limit_sun: i64,
    },

    /// Call `method` with a JSON parameter list, e.g. '[{"address":"T..."},{"uint256":"1"}]'.
    Call {
        #[arg(long, default_value = "")]
        from: String,
        #[arg(long)]
        contract: String,
        #[arg(long)]
        method: String,
        #[arg(long, default_value = "")]
        params: String,
        /// Build a state-changing transaction instead of a read-only call.
        #[arg(long)]
        trigger: bool,
        #[arg(long, default_value_t = 0)]
        fee_limit_sun: i64,
        #[arg(long, default_value_t = 0)]
        call_value_sun: i64,
        #[arg(long, default_value = "")]
        token_id: String,
        #[arg(long, default_value_t = 0)]
        token_amount: i64,
    },
}

pub async fn run(
    command: Command,
    client: &ContractClient<TronGrpc>,
    balances: &BalanceService<ContractClient<TronGrpc>>,
) -> Result<()> {
    match command {
        Command::Balance { address } => {
            let sun = balances
                .get_balance(&address)
                .await
                .with_context(|| format!("balance of {address}"))?;
            println!("{sun}");
        }
        Command::TokenBalance { holder, contract } => {
            let units = balances
                .get_trc20_token_balance(&holder, &contract)
                .await
                .with_context(|| format!("trc20 balance of {holder} on {contract}"))?;
            println!("{units}");
        }
        Command::TokenInfo { contract } => {
            let name = client.token_name(&contract).await.context("token name")?;
            let symbol = client
                .token_symbol(&contract)
                .await
                .context("token symbol")?;
            let decimals = client
                .token_decimals(&contract)
                .await
                .context("token decimals")?;
            println!("name={name} symbol={symbol} decimals={decimals}");
        }
        Command::SendToken {
            from,
            to,
            contract,
            amount,
            fee_limit_sun,
        } => {
            let amount: U256 = amount
                .parse()
                .with_context(|| format!("invalid amount: {amount}"))?;
            let res = client
                .send_token(&from, &to, &contract, amount, fee_limit_sun)
                .await
                .context("build trc20 transfer")?;
            print_transaction(&res)?;
        }
        Command::Call {
            from,
            contract,
            method,
            params,
            trigger,
            fee_limit_sun,
            call_value_sun,
            token_id,
            token_amount,
        } => {
            if trigger {
                let res = client
                    .trigger_json(
                        &from,
                        &contract,
                        &method,
                        &params,
                        fee_limit_sun,
                        call_value_sun,
                        &token_id,
                        token_amount,
                    )
                    .await
                    .with_context(|| format!("trigger {method} on {contract}"))?;
                print_transaction(&res)?;
            } else {
                let res = client
                    .trigger_constant_json(&from, &contract, &method, &params)
                    .await
                    .with_context(|| format!("call {method} on {contract}"))?;
                println!("energy_used={}", res.energy_used);
                for slot in &res.constant_result {
                    println!("0x{}", hex::encode(slot));
                }
            }
        }
    }
    Ok(())
}

fn print_transaction(res: &ContractCallResult) -> Result<()> {
    let tx = res
        .transaction
        .as_ref()
        .context("node returned no transaction")?;
    println!("txid=0x{}", hex::encode(tx.txid()));
    println!("fee_limit_sun={}", tx.fee_limit());
    println!("energy_used={}", res.energy_used);
    println!("raw_data=0x{}", hex::encode(tx.raw_bytes()));
    Ok(())
}
