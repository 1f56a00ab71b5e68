//! Everything the console prints that is not a command reply.
use crate::cash::Withdrawal;
use crate::ledger::Bank;

pub const ICON: &str = r"
                       **
                    ** ** **
                 ***        ***
              ***              ***
           ***                    ***
        ***                          ***
     *** ** ************************ ** ***

        ****    ****         ****   ****
         **      **           **     **
         **      **           **     **
         **      **           **     **
         **      **           **     **
        ****    ****         ****   ****

       **********************************
     **************************************
";

pub const HEADER: &str = "
 ////////////////////////////////////////////////
 //     Welcome to the Transaction Console     //
 ////////////////////////////////////////////////
";

pub const HELP: &str = "
> Command $: login
             to proceed for login
> Command $: deposit (amount)
     e.g. $: deposit 300
             will deposit 300 into the logged in account
> Command $: withdraw (amount)
     e.g. $: withdraw 300
             will withdraw 300 from the logged in account
> Command $: withdraw cash (amount) (note-denom...) done
     e.g. $: withdraw cash 300 100 50 done
             will withdraw 300 from the logged in account
             in form of cash, maximizing the notes of 100
             and then the notes of 50. Whatever is left is
             paid with the fewest possible notes and coins.
> Command $: show
             to show the status of the logged in account
> Command $: logout
             to proceed for logout
> Command $: exit
             to terminate the console
";

pub fn prompt(bank: &Bank) -> String {
    let user = bank.current().map_or("Guest", |account| account.name());
    format!("{}@{} $: ", user, bank.name())
}

pub fn show(bank: &Bank) -> String {
    let Some(account) = bank.current() else {
        return format!(
            "> The Bank Name is {}, which is\n  currently under nobody's control.",
            bank.name()
        );
    };
    format!(
        "> The Bank Name is {bank}, which is\n  currently under {user}'s control.\n\
         > Account with ID {id} is owned by\n  the user {user} who has Rs. {balance}/-",
        bank = bank.name(),
        user = account.name(),
        id = account.id(),
        balance = account.balance(),
    )
}

pub fn cash(withdrawal: &Withdrawal) -> String {
    let mut lines = vec![format!(
        "> You have withdrawn cash of total amount Rs. {}/- as",
        withdrawal.amount()
    )];
    lines.extend(withdrawal.pieces().map(|(denomination, count)| {
        let kind = if denomination.is_coin() { "Coin" } else { "Note" };
        format!("  {count:4} {kind}(s) of {denomination}")
    }));
    lines.join("\n")
}
