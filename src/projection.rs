use crate::account::AccountRecord;

/// Ids and names of a set of accounts.
///
/// The two lists are independent: an account without an id still contributes
/// its name, and the other way round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub ids: Vec<String>,
    pub names: Vec<String>,
}

pub fn project<'a>(accounts: impl IntoIterator<Item = &'a AccountRecord>) -> Projection {
    let mut projection = Projection::default();
    for account in accounts {
        if let Some(id) = account.cloud_account_id() {
            projection.ids.push(id.into_owned());
        }
        if let Some(name) = account.account_name() {
            projection.names.push(name.into_owned());
        }
    }
    projection
}
