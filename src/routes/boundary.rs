use maud::Markup;

use crate::outcome::Caught;

pub fn catch(caught: &Caught) -> Markup {
    let message = match caught {
        Caught::Unauthorized(denied) => maud::html! {
            p {
                "Looks like you tried to visit a page that you do not have access to. "
                "Maybe ask the webmaster (" (denied.contact_email) ") for access."
            }
        },
        Caught::NotFound => maud::html! {
            p { "Looks like you tried to visit a page that does not exist." }
        },
        Caught::Other { .. } => maud::html! {
            p { "There was a problem with your request!" }
            hr;
            p { (caught.status().as_u16()) " " (caught.status_text()) }
        },
    };

    maud::html! {
        h2 { "Oops!" }
        div .message { (message) }
        (stay_in_context())
    }
}

pub fn error(message: &str) -> Markup {
    maud::html! {
        h2 { "Error!" }
        p { (message) }
        (stay_in_context())
    }
}

fn stay_in_context() -> Markup {
    maud::html! {
        p {
            "(Isn't it cool that the user gets to stay in context and try a different "
            "link in the parts of the UI that didn't blow up?)"
        }
    }
}
