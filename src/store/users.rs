use crate::models::{Role, User};

use super::Store;

pub enum AddUserOutcome {
    Added,
    DuplicateUsername,
}

impl Store {
    pub fn find_user(&self, username: &str) -> Option<User> {
        self.read()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Plaintext credential check against the users table. Returns the
    /// matching user, or `None` on a credential mismatch.
    pub fn verify_login(&self, username: &str, password: &str) -> Option<User> {
        self.read()
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
    }

    pub fn list_students(&self) -> Vec<User> {
        self.read()
            .users
            .iter()
            .filter(|u| u.role == Role::Student)
            .cloned()
            .collect()
    }

    pub fn add_student(&self, username: &str, password: &str) -> AddUserOutcome {
        {
            let mut tables = self.write();
            if tables.users.iter().any(|u| u.username == username) {
                return AddUserOutcome::DuplicateUsername;
            }
            tables.users.push(User {
                username: username.to_owned(),
                password: password.to_owned(),
                role: Role::Student,
                full_name: None,
                study_program: None,
                reg_number: None,
            });
        }
        self.persist_users();
        tracing::info!("added student account '{username}'");
        AddUserOutcome::Added
    }

    /// Fill in the student profile fields, returning the updated user.
    pub fn update_profile(
        &self,
        username: &str,
        full_name: &str,
        study_program: &str,
        reg_number: &str,
    ) -> Option<User> {
        let updated = {
            let mut tables = self.write();
            let user = tables.users.iter_mut().find(|u| u.username == username)?;
            user.full_name = Some(full_name.to_owned());
            user.study_program = Some(study_program.to_owned());
            user.reg_number = Some(reg_number.to_owned());
            user.clone()
        };
        self.persist_users();
        Some(updated)
    }
}
