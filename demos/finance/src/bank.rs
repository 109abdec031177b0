//! Banks, accounts and monthly interest.
//!
//! Amounts are whole cents.  Interest is paid on the first of each month:
//! the average of the daily closing balances since the last payment, times
//! the annual rate over twelve, rounded to the cent.

use std::fmt;

use chrono::Datelike;
use log::debug;
use simloop_core::SimTime;

/// An amount of money in cents.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Debug)]
pub struct Cents(pub i64);

impl Cents {
    pub fn dollars(amount: i64) -> Cents {
        Cents(amount * 100)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub at:          SimTime,
    pub description: String,
    pub amount:      Cents,
    pub balance:     Cents,
}

// ── Account ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Account {
    pub name:     String,
    balance:      Cents,
    month_rate:   f64,
    transactions: Vec<Transaction>,
    daily_total:  i64,
    daily_count:  u32,
}

impl Account {
    pub fn open(name: &str, balance: Cents, annual_rate: f64, now: SimTime) -> Account {
        let mut account = Account {
            name:         name.to_owned(),
            balance:      Cents(0),
            month_rate:   annual_rate / 12.0,
            transactions: Vec::new(),
            daily_total:  0,
            daily_count:  0,
        };
        if balance != Cents(0) {
            account.transfer("Opening balance", balance, now);
        }
        account
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transfer(&mut self, description: &str, amount: Cents, now: SimTime) {
        self.balance = Cents(self.balance.0 + amount.0);
        self.transactions.push(Transaction {
            at:          now,
            description: description.to_owned(),
            amount,
            balance:     self.balance,
        });
    }

    /// Close the day at `now`: pay interest if a month just began, then
    /// record today's balance toward the next payment.
    pub fn handle_new_day(&mut self, now: SimTime) {
        if now.date().day() == 1 {
            let interest = self.accrued_interest();
            if interest != Cents(0) {
                debug!("Recording interest on {}: {interest}", self.name);
                self.transfer("Interest", interest, now);
            }
            self.daily_total = 0;
            self.daily_count = 0;
        }
        self.daily_total += self.balance.0;
        self.daily_count += 1;
    }

    fn accrued_interest(&self) -> Cents {
        if self.daily_count == 0 {
            return Cents(0);
        }
        let average = self.daily_total as f64 / f64::from(self.daily_count);
        Cents((average * self.month_rate).round() as i64)
    }
}

// ── Bank ──────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Bank {
    pub name:     String,
    pub accounts: Vec<Account>,
}

impl Bank {
    pub fn new(name: &str) -> Bank {
        Bank { name: name.to_owned(), accounts: Vec::new() }
    }

    pub fn open_account(&mut self, name: &str, balance: Cents, annual_rate: f64, now: SimTime) {
        debug!("Opening account {name} with balance {balance} and rate {annual_rate}");
        self.accounts.push(Account::open(name, balance, annual_rate, now));
    }

    pub fn handle_new_day(&mut self, now: SimTime) {
        for account in &mut self.accounts {
            account.handle_new_day(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> SimTime {
        SimTime::parse(&format!("{y:04}-{m:02}-{d:02}")).unwrap()
    }

    #[test]
    fn cents_display() {
        assert_eq!(Cents(1_500_000).to_string(), "15000.00");
        assert_eq!(Cents(175).to_string(), "1.75");
        assert_eq!(Cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn opening_balance_is_a_transaction() {
        let account = Account::open("checking", Cents::dollars(15_000), 0.0, day(2022, 6, 1));
        assert_eq!(account.transactions().len(), 1);
        assert_eq!(account.transactions()[0].description, "Opening balance");
        assert_eq!(account.balance(), Cents::dollars(15_000));

        let empty = Account::open("empty", Cents(0), 0.0, day(2022, 6, 1));
        assert!(empty.transactions().is_empty());
    }

    #[test]
    fn interest_paid_on_first_of_month() {
        let mut account = Account::open("savings", Cents::dollars(1_200), 0.12, day(2022, 6, 1));
        for d in 2..=30 {
            account.handle_new_day(day(2022, 6, d));
        }
        assert_eq!(account.transactions().len(), 1);

        account.handle_new_day(day(2022, 7, 1));
        let paid = account.transactions().last().unwrap();
        assert_eq!(paid.description, "Interest");
        assert_eq!(paid.amount, Cents::dollars(12));
        assert_eq!(paid.balance, Cents::dollars(1_212));
    }

    #[test]
    fn zero_rate_pays_nothing() {
        let mut account = Account::open("checking", Cents::dollars(100), 0.0, day(2022, 6, 1));
        account.handle_new_day(day(2022, 6, 2));
        account.handle_new_day(day(2022, 7, 1));
        assert_eq!(account.transactions().len(), 1);
    }
}
