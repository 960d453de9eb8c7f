use std::io::{self, Write};

use colored::Colorize;

use crate::commands::users::{matches_filter, parse_user_id, print_detail};
use crate::error::Result;
use crate::store::{DirectoryStore, UserSource};
use crate::types::User;

/// Interactive session: one store lives for the whole loop, so repeated
/// views of listed ids are served from the cached list and a failed fetch
/// can be retried in place.
pub async fn run<S: UserSource>(store: &DirectoryStore<S>) -> Result<()> {
    println!("{}", "User directory".bold());
    println!("Commands: list, view <id>, select <n>, filter <term>, retry, help, quit");
    println!();

    let mut filter: Option<String> = None;

    store.fetch_all_users().await;
    if !report_error(store) {
        render_list(&store.users(), filter.as_deref());
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "list" | "ls" => {
                store.fetch_all_users().await;
                if !report_error(store) {
                    render_list(&store.users(), filter.as_deref());
                }
            }
            "view" | "v" => match parse_user_id(rest) {
                Ok(id) => {
                    store.fetch_user_by_id(id).await;
                    if !report_error(store) {
                        if let Some(user) = store.selected_user() {
                            print_detail(&user);
                        }
                    }
                }
                Err(err) => println!("{}", err.to_string().red()),
            },
            "select" | "s" => {
                let picked = {
                    let users = store.users();
                    let visible = visible_users(&users, filter.as_deref());
                    match rest.parse::<usize>() {
                        Ok(n) if n >= 1 && n <= visible.len() => Ok(User::clone(visible[n - 1])),
                        _ => Err(visible.len()),
                    }
                };
                match picked {
                    Ok(user) => {
                        // no fetch: the row is already in hand
                        store.set_selected_user(Some(user.clone()));
                        print_detail(&user);
                    }
                    Err(len) => println!("select: expected a row number between 1 and {len}"),
                }
            }
            "filter" | "f" => {
                filter = if rest.is_empty() {
                    None
                } else {
                    Some(rest.to_string())
                };
                render_list(&store.users(), filter.as_deref());
            }
            "retry" => {
                store.clear_error();
                store.fetch_all_users().await;
                if !report_error(store) {
                    render_list(&store.users(), filter.as_deref());
                }
            }
            "help" | "?" => print_help(),
            "quit" | "q" | "exit" => break,
            other => println!("Unknown command '{other}'. Type 'help' for a list."),
        }
    }

    Ok(())
}

/// Surface the store's error slot. Returns true when there was one.
fn report_error<S: UserSource>(store: &DirectoryStore<S>) -> bool {
    match store.error() {
        Some(message) => {
            println!("{} {}", "error:".red().bold(), message);
            println!("Type 'retry' to try again.");
            true
        }
        None => false,
    }
}

fn visible_users<'a>(users: &'a [User], filter: Option<&str>) -> Vec<&'a User> {
    users
        .iter()
        .filter(|u| filter.map_or(true, |q| matches_filter(u, q)))
        .collect()
}

fn render_list(users: &[User], filter: Option<&str>) {
    let visible = visible_users(users, filter);
    if visible.is_empty() {
        println!("No users matched.");
        return;
    }

    for (row, user) in visible.iter().enumerate() {
        println!(
            "{:>3}  #{:<4} {} {} <{}>  {}",
            (row + 1).to_string().bold(),
            user.id,
            user.name.firstname,
            user.name.lastname,
            user.email,
            user.address.city.dimmed(),
        );
    }
    if let Some(query) = filter {
        println!("{}", format!("(filter: {query})").dimmed());
    }
}

fn print_help() {
    println!("list             Re-fetch and show the user list");
    println!("view <id>        Show one user (cached ids skip the network)");
    println!("select <n>       Select row n from the list, no fetch");
    println!("filter <term>    Narrow the list; 'filter' alone clears it");
    println!("retry            Clear the last error and fetch the list again");
    println!("quit             Leave the session");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Geolocation, Name};

    fn mk_user(id: u64, username: &str) -> User {
        User {
            id,
            email: format!("{username}@example.com"),
            username: username.to_string(),
            password: "pw".to_string(),
            name: Name {
                firstname: username.to_string(),
                lastname: "tester".to_string(),
            },
            address: Address {
                city: "kilcoole".to_string(),
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
    fn visible_users_applies_the_session_filter() {
        let users = vec![mk_user(1, "alice"), mk_user(2, "bob")];

        let all = visible_users(&users, None);
        assert_eq!(all.len(), 2);

        let filtered = visible_users(&users, Some("BO"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);

        assert!(visible_users(&users, Some("carol")).is_empty());
    }
}
