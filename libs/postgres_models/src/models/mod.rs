pub mod bill_payments;
pub mod bills;
pub mod budgets;
pub mod category;
pub mod pot_movements;
pub mod pots;
pub mod transactions;
pub mod users;

pub use bill_payments::{BillPayment, NewBillPayment, PaymentStatus};
pub use bills::{Bill, BillChanges, NewBill};
pub use budgets::{Budget, BudgetChanges, NewBudget};
pub use category::Category;
pub use pot_movements::{MovementKind, NewPotMovement, PotMovement};
pub use pots::{NewPot, Pot, PotChanges};
pub use transactions::{NewTransaction, Transaction, TransactionChanges, TransactionKind};
pub use users::{NewUser, User, UserChanges, UserProfile};
