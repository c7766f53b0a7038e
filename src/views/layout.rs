use maud::{html, Markup, DOCTYPE};

use crate::utils;

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="/static/index.css";
    }
}

fn header() -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."brand" {
                        a href="/" {
                            strong { "Aptitest" }
                        }
                    }
                }
                ul {
                    li."version" { (utils::VERSION) }
                }
            }
        }
    }
}

pub fn page(title: &str, body: Markup, background: Option<&str>) -> Markup {
    let body_style = background
        .filter(|url| !url.is_empty())
        .map(|url| format!("background-image: url({url});"));

    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())

            title { (format!("{title} - Aptitest")) }
        }

        body."container" style=[body_style] {
            (header())
            main { (body) }
        }
    }
}
