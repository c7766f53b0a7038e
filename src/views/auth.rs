use maud::{html, Markup};

use crate::models::User;
use crate::names;

pub(super) fn login(error: Option<&'static str>) -> Markup {
    html! {
        article."auth-card" {
            h1 { "Tes Potensi Akademik" }
            p { "Please log in to continue" }
            form method="post" action=(names::LOGIN_URL) {
                label {
                    "Username"
                    input type="text" name="username" autocomplete="username" required;
                }
                label {
                    "Password"
                    input type="password" name="password" autocomplete="current-password" required;
                }
                @if let Some(error) = error {
                    p."error-message" { (error) }
                }
                button type="submit" { "Log in" }
            }
        }
    }
}

pub(super) fn profile_completion(user: &User) -> Markup {
    html! {
        article {
            h2 { "Complete your profile" }
            p { "Welcome, " (user.username) ". Fill these in before starting the test." }
            form method="post" action=(names::PROFILE_URL) {
                label {
                    "Full name"
                    input type="text" name="full_name" required;
                }
                label {
                    "Study program"
                    select name="study_program" required {
                        @for program in names::STUDY_PROGRAMS {
                            option value=(program) { (program) }
                        }
                    }
                }
                label {
                    "Registration number"
                    input type="text" name="reg_number" required;
                }
                button type="submit" { "Save profile" }
            }
        }
    }
}
