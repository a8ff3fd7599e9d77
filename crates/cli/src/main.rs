//! # Svault CLI
//!
//! Vaultのアドレス導出・トランザクション検査・Actions APIの呼び出しを行う開発用ツール。
//!
//! ## サブコマンド
//! - `derive <OWNER>`: state / vault アドレスを表示
//! - `inspect <TRANSACTION>`: Base64トランザクションをデコードして表示
//! - `post <URL> --account <PUBKEY>`: Action URLにPOSTし、返却されたトランザクションを検査

use std::str::FromStr;

use base58::ToBase58;
use clap::{Parser, Subcommand};
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use svault_core::{decode_transaction, VaultOperation, VaultProgram};
use svault_types::{ActionErrorBody, ActionPostRequest, ActionPostResponse};

#[derive(Parser)]
#[command(name = "svault", version, about = "Svault Vault Actions 開発ツール")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 所有者の公開鍵から state / vault アドレスを導出する
    Derive {
        /// 所有者の公開鍵（Base58）
        owner: String,
        /// VaultプログラムID（省略時は既定値）
        #[arg(long)]
        program_id: Option<String>,
    },
    /// Base64エンコードされた未署名トランザクションを検査する
    Inspect {
        transaction: String,
        #[arg(long)]
        program_id: Option<String>,
    },
    /// Action URLにPOSTし、返却されたトランザクションを検査する
    Post {
        /// 例: http://localhost:3000/api/actions/deposit?amount=0.5
        url: String,
        /// 署名者となるウォレットの公開鍵（Base58）
        #[arg(long)]
        account: String,
        #[arg(long)]
        program_id: Option<String>,
    },
}

fn resolve_program(program_id: Option<&str>) -> anyhow::Result<VaultProgram> {
    match program_id {
        Some(s) => {
            let id = Pubkey::from_str(s.trim())
                .map_err(|e| anyhow::anyhow!("プログラムIDのBase58デコードに失敗: {e}"))?;
            Ok(VaultProgram::new(id))
        }
        None => Ok(VaultProgram::default()),
    }
}

fn parse_owner(raw: &str) -> anyhow::Result<Pubkey> {
    svault_core::parse_pubkey("owner", raw).map_err(|e| anyhow::anyhow!("{e}"))
}

fn print_derive(program: &VaultProgram, owner: &Pubkey) {
    let identity = program.derive(owner);
    println!("program: {}", program.program_id());
    println!("owner:   {owner}");
    println!("state:   {} (bump {})", identity.state, identity.state_bump);
    println!("vault:   {} (bump {})", identity.vault, identity.vault_bump);
}

/// ヘッダからアカウントの署名者・書き込み可フラグを求める。
fn account_flags(message: &Message, index: usize) -> (&'static str, &'static str) {
    let header = &message.header;
    let signed = header.num_required_signatures as usize;
    let signer = index < signed;
    let writable = if signer {
        index < signed.saturating_sub(header.num_readonly_signed_accounts as usize)
    } else {
        index < message
            .account_keys
            .len()
            .saturating_sub(header.num_readonly_unsigned_accounts as usize)
    };
    (
        if signer { "s" } else { "-" },
        if writable { "w" } else { "-" },
    )
}

fn print_transaction(program: &VaultProgram, tx: &Transaction) -> anyhow::Result<()> {
    let message = &tx.message;
    let fee_payer = message
        .account_keys
        .first()
        .ok_or_else(|| anyhow::anyhow!("アカウントキーがありません"))?;

    println!("fee payer:  {fee_payer}");
    println!("blockhash:  {}", message.recent_blockhash);
    println!(
        "signatures: {} ({} 未署名)",
        tx.signatures.len(),
        tx.signatures
            .iter()
            .filter(|s| **s == solana_sdk::signature::Signature::default())
            .count()
    );

    for (i, compiled) in message.instructions.iter().enumerate() {
        let program_id = message
            .account_keys
            .get(compiled.program_id_index as usize)
            .ok_or_else(|| anyhow::anyhow!("program_id_indexが範囲外です"))?;
        println!("instruction #{i}");
        println!("  program: {program_id}");
        println!("  data:    {}", compiled.data.to_base58());

        if program_id == program.program_id() {
            match VaultOperation::decode(&compiled.data) {
                Ok(op) => match op.amount() {
                    Some(amount) => println!(
                        "  op:      {} {} SOL ({} lamports)",
                        op.kind(),
                        amount,
                        amount.lamports()
                    ),
                    None => println!("  op:      {}", op.kind()),
                },
                Err(e) => println!("  op:      デコード失敗 ({e})"),
            }
        }

        for (j, index) in compiled.accounts.iter().enumerate() {
            let index = *index as usize;
            let key = message
                .account_keys
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("アカウントインデックスが範囲外です"))?;
            let (signer, writable) = account_flags(message, index);
            println!("  [{j}] {signer}{writable} {key}");
        }
    }

    // 所有者から導出したアドレスと一致するか
    let identity = program.derive(fee_payer);
    let keys = &message.account_keys;
    let matches = keys.contains(&identity.state) && keys.contains(&identity.vault);
    println!(
        "derived accounts: {}",
        if matches { "一致" } else { "不一致" }
    );
    Ok(())
}

async fn post_action(program: &VaultProgram, url: &str, account: &Pubkey) -> anyhow::Result<()> {
    let response = reqwest::Client::new()
        .post(url)
        .json(&ActionPostRequest {
            account: Some(account.to_string()),
        })
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP送信失敗: {e}"))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| anyhow::anyhow!("レスポンス読み取り失敗: {e}"))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ActionErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);
        anyhow::bail!("HTTP {status}: {message}");
    }

    let body: ActionPostResponse = serde_json::from_str(&text)
        .map_err(|e| anyhow::anyhow!("レスポンスのパースに失敗: {e}"))?;
    if let Some(message) = &body.message {
        println!("message:    {message}");
    }

    let tx = decode_transaction(&body.transaction).map_err(|e| anyhow::anyhow!("{e}"))?;
    print_transaction(program, &tx)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Derive { owner, program_id } => {
            let program = resolve_program(program_id.as_deref())?;
            print_derive(&program, &parse_owner(&owner)?);
        }
        Command::Inspect {
            transaction,
            program_id,
        } => {
            let program = resolve_program(program_id.as_deref())?;
            let tx = decode_transaction(&transaction).map_err(|e| anyhow::anyhow!("{e}"))?;
            print_transaction(&program, &tx)?;
        }
        Command::Post {
            url,
            account,
            program_id,
        } => {
            let program = resolve_program(program_id.as_deref())?;
            let account = svault_core::parse_pubkey("account", &account)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            post_action(&program, &url, &account).await?;
        }
    }

    Ok(())
}
