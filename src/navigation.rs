//! The navigation bar shown at the top of the pages for a logged in account.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::BANK_NAME,
};

/// A link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link {
    url: String,
    title: &'static str,
    is_current: bool,
}

impl Link {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar {
    links: Vec<Link>,
}

impl NavBar {
    /// Get the navigation bar.
    ///
    /// The account pages are linked when `account_number` is given. If a link's
    /// route matches `active_endpoint`, e.g. [endpoints::DASHBOARD_VIEW], then
    /// that link is marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str, account_number: Option<&str>) -> NavBar {
        let mut links = Vec::new();

        if let Some(account_number) = account_number {
            links.push(Link {
                url: format_endpoint(endpoints::DASHBOARD_VIEW, &[account_number]),
                title: "Dashboard",
                is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
            });
            links.push(Link {
                url: format_endpoint(endpoints::HISTORY_VIEW, &[account_number]),
                title: "Transactions",
                is_current: active_endpoint == endpoints::HISTORY_VIEW,
            });
        }

        links.push(Link {
            url: endpoints::ACCOUNTS_VIEW.to_owned(),
            title: "Accounts",
            is_current: active_endpoint == endpoints::ACCOUNTS_VIEW,
        });
        links.push(Link {
            url: endpoints::LOG_IN_VIEW.to_owned(),
            title: if account_number.is_some() {
                "Log out"
            } else {
                "Log in"
            },
            is_current: false,
        });

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        (BANK_NAME)
                    }

                    div class="w-full lg:block lg:w-auto"
                    {
                        ul
                            class="font-medium flex flex-col p-4 lg:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            lg:flex-row lg:space-x-8 rtl:space-x-reverse lg:mt-0
                            lg:border-0 lg:bg-white dark:bg-gray-800
                            lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in self.links {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}
