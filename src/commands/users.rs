use tabled::Tabled;

use crate::cli::UserListArgs;
use crate::error::{DirectoryError, Result};
use crate::output::{self, truncate};
use crate::store::{DirectoryStore, UserSource};
use crate::types::User;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: truncate(&format!("{} {}", user.name.firstname, user.name.lastname), 30),
            username: user.username.clone(),
            email: truncate(&user.email, 40),
            city: user.address.city.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// Case-insensitive substring match over the fields a directory search
/// cares about.
pub fn matches_filter(user: &User, query: &str) -> bool {
    let q = query.to_lowercase();
    user.username.to_lowercase().contains(&q)
        || user.email.to_lowercase().contains(&q)
        || user.name.firstname.to_lowercase().contains(&q)
        || user.name.lastname.to_lowercase().contains(&q)
        || user.address.city.to_lowercase().contains(&q)
        || user.id.to_string().contains(&q)
}

/// The store takes an already-validated numeric id; rejecting free-form
/// input is the view layer's job.
pub fn parse_user_id(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DirectoryError::InvalidUserId(raw.to_string())),
    }
}

pub async fn list<S: UserSource>(store: &DirectoryStore<S>, args: UserListArgs) -> Result<()> {
    store.fetch_all_users().await;
    if let Some(message) = store.error() {
        return Err(DirectoryError::Fetch(message));
    }

    let users = store.users();
    let visible: Vec<&User> = match args.filter.as_deref() {
        Some(query) => users.iter().filter(|u| matches_filter(u, query)).collect(),
        None => users.iter().collect(),
    };

    if visible.is_empty() {
        output::print_message("No users matched.");
        return Ok(());
    }

    output::print_table(&visible, |u| UserRow::from(*u));
    Ok(())
}

pub async fn view<S: UserSource>(store: &DirectoryStore<S>, raw_id: &str) -> Result<()> {
    let id = parse_user_id(raw_id)?;

    store.fetch_user_by_id(id).await;

    match store.selected_user() {
        Some(user) => {
            output::print_item(&user, print_detail);
            Ok(())
        }
        None => Err(DirectoryError::Fetch(store.error().unwrap_or_else(|| {
            format!("Failed to fetch user with ID {id}. Please try again.")
        }))),
    }
}

pub(crate) fn print_detail(user: &User) {
    println!("{} {} (#{})", user.name.firstname, user.name.lastname, user.id);
    println!();
    println!("Username: {}", user.username);
    println!("Email:    {}", user.email);
    println!("Phone:    {}", user.phone);
    println!(
        "Address:  {} {}, {}, {}",
        user.address.number, user.address.street, user.address.city, user.address.zipcode
    );
    println!(
        "Geo:      {}, {}",
        user.address.geolocation.lat, user.address.geolocation.long
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Geolocation, Name};

    fn mk_user(id: u64, first: &str, last: &str, username: &str, city: &str) -> User {
        User {
            id,
            email: format!("{username}@example.com"),
            username: username.to_string(),
            password: "pw".to_string(),
            name: Name {
                firstname: first.to_string(),
                lastname: last.to_string(),
            },
            address: Address {
                city: city.to_string(),
                street: "new road".to_string(),
                number: 1,
                zipcode: "00000".to_string(),
                geolocation: Geolocation {
                    lat: "0".to_string(),
                    long: "0".to_string(),
                },
            },
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn filter_matches_across_fields_case_insensitively() {
        let user = mk_user(3, "John", "Doe", "johnd", "Kilcoole");

        assert!(matches_filter(&user, "jOhN"));
        assert!(matches_filter(&user, "doe"));
        assert!(matches_filter(&user, "KILCOOLE"));
        assert!(matches_filter(&user, "example.com"));
        assert!(matches_filter(&user, "3"));
        assert!(!matches_filter(&user, "smith"));
    }

    #[test]
    fn id_parsing_accepts_positive_integers_only() {
        assert_eq!(parse_user_id("2").unwrap(), 2);
        assert_eq!(parse_user_id(" 7 ").unwrap(), 7);

        assert!(matches!(
            parse_user_id("0"),
            Err(DirectoryError::InvalidUserId(_))
        ));
        assert!(matches!(
            parse_user_id("-1"),
            Err(DirectoryError::InvalidUserId(_))
        ));
        assert!(matches!(
            parse_user_id("abc"),
            Err(DirectoryError::InvalidUserId(_))
        ));
        assert!(matches!(
            parse_user_id(""),
            Err(DirectoryError::InvalidUserId(_))
        ));
    }
}
