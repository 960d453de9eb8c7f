use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: Name,
    pub address: Address,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: u32,
    pub zipcode: String,
    pub geolocation: Geolocation,
}

/// Coordinates as supplied by the source. Kept as strings; nothing here
/// does arithmetic on them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub lat: String,
    pub long: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_directory_user() {
        let json = r#"{
            "address": {
                "geolocation": { "lat": "-37.3159", "long": "81.1496" },
                "city": "kilcoole",
                "street": "new road",
                "number": 7682,
                "zipcode": "12926-3874"
            },
            "id": 1,
            "email": "john@gmail.com",
            "username": "johnd",
            "password": "m38rmF$",
            "name": { "firstname": "john", "lastname": "doe" },
            "phone": "1-570-236-7033",
            "__v": 0
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "johnd");
        assert_eq!(user.name.lastname, "doe");
        assert_eq!(user.address.number, 7682);
        assert_eq!(user.address.geolocation.lat, "-37.3159");
    }

    #[test]
    fn decodes_a_user_array_in_source_order() {
        let json = r#"[
            {"address":{"geolocation":{"lat":"0","long":"0"},"city":"a","street":"s","number":1,"zipcode":"z"},
             "id":3,"email":"c@x.com","username":"c","password":"p","name":{"firstname":"c","lastname":"c"},"phone":"3"},
            {"address":{"geolocation":{"lat":"0","long":"0"},"city":"b","street":"s","number":2,"zipcode":"z"},
             "id":1,"email":"a@x.com","username":"a","password":"p","name":{"firstname":"a","lastname":"a"},"phone":"1"}
        ]"#;

        let users: Vec<User> = serde_json::from_str(json).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 3);
        assert_eq!(users[1].id, 1);
    }
}
