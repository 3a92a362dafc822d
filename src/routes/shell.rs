const SITE_NAME: &str = "boundary";

pub fn document(markup: maud::Markup, title: &str) -> maud::Markup {
    maud::html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }

            body {
                div .container {
                    (header())
                    main { (markup) }
                    (footer())
                }
            }
        }
    }
}

fn header() -> maud::Markup {
    maud::html! {
        nav {
            span {
                a href="/" { (SITE_NAME) }
            }
            ul {
                li { a href="/demos/params" { "params" } }
            }
        }
    }
}

fn footer() -> maud::Markup {
    maud::html! {
        footer {
            small { "revision " code { (env!("GIT_HASH")) } }
        }
    }
}
