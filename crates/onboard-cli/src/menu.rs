//! Interactive menu loop

use tracing::debug;

use wallet_core::{Result, Terminal, WalletError, WalletWorkflow};

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    Show,
    Faucet,
    Upload,
    Export,
    Switch,
    List,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 8] = [
        MenuChoice::Create,
        MenuChoice::Show,
        MenuChoice::Faucet,
        MenuChoice::Upload,
        MenuChoice::Export,
        MenuChoice::Switch,
        MenuChoice::List,
        MenuChoice::Exit,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::Create => "1",
            MenuChoice::Show => "2",
            MenuChoice::Faucet => "3",
            MenuChoice::Upload => "4",
            MenuChoice::Export => "5",
            MenuChoice::Switch => "6",
            MenuChoice::List => "7",
            MenuChoice::Exit => "0",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Create => "Create a new wallet",
            MenuChoice::Show => "Show wallet address",
            MenuChoice::Faucet => "Fund wallet (faucet)",
            MenuChoice::Upload => "Upload a file",
            MenuChoice::Export => "Export private key",
            MenuChoice::Switch => "Switch account",
            MenuChoice::List => "List accounts",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Some(MenuChoice::Exit);
        }
        Self::ALL.into_iter().find(|c| c.key() == input)
    }
}

/// Run the menu until the user exits or input ends
pub async fn run(workflow: &WalletWorkflow, term: &mut dyn Terminal) -> Result<()> {
    loop {
        let active = workflow.store().active_account_name().await;

        term.info("");
        term.info(&format!("Shelby wallet - active account: {}", active));
        for choice in MenuChoice::ALL {
            term.info(&format!("  {}) {}", choice.key(), choice.label()));
        }

        let input = match term.prompt("Choose an option: ") {
            Ok(input) => input,
            Err(WalletError::UserCancelled(_)) => return Ok(()),
            Err(e) => return Err(e),
        };

        let Some(choice) = MenuChoice::parse(&input) else {
            term.error(&format!("Unknown option '{}'", input.trim()));
            continue;
        };

        if choice == MenuChoice::Exit {
            return Ok(());
        }

        if let Err(e) = dispatch(workflow, term, choice).await {
            report(term, &e);
        }
    }
}

async fn dispatch(
    workflow: &WalletWorkflow,
    term: &mut dyn Terminal,
    choice: MenuChoice,
) -> Result<()> {
    debug!("Menu choice: {:?}", choice);

    match choice {
        MenuChoice::Create => workflow.create(term).await.map(|_| ()),
        MenuChoice::Show => workflow.show(term).await.map(|_| ()),
        MenuChoice::Faucet => workflow.faucet(term).await.map(|_| ()),
        MenuChoice::Upload => workflow.upload(term).await.map(|_| ()),
        MenuChoice::Export => workflow.export(term).await,
        MenuChoice::Switch => {
            let name = term.prompt("Account to switch to: ")?;
            let account = workflow.switch_account(name.trim()).await?;
            term.success(&format!("Active account is now '{}'", account.name));
            Ok(())
        }
        MenuChoice::List => workflow.list_accounts(term).await.map(|_| ()),
        MenuChoice::Exit => Ok(()),
    }
}

/// Report an action failure; the session continues
pub fn report(term: &mut dyn Terminal, error: &WalletError) {
    match error {
        WalletError::UserCancelled(reason) => term.info(&format!("Cancelled: {}", reason)),
        WalletError::AccountNotFound(name) => term.error(&format!(
            "No wallet for account '{}'. Choose \"{}\" to create one.",
            name,
            MenuChoice::Create.label()
        )),
        other => term.error(&other.to_string()),
    }
}
