pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod transport;
    }
}

pub mod modules {
    pub mod registration_webhook {
        pub mod core {
            pub mod errors;
            pub mod expect;
            pub mod registration;
            pub mod response;
        }
        pub mod adapters {
            pub mod outbound {
                pub mod webhook_client;
            }
        }
        pub mod use_cases {
            pub mod health {
                pub mod category;
                pub mod probe;
            }
            pub mod integration {
                pub mod category;
                pub mod delivery;
                pub mod submission;
                pub mod validation;
            }
            pub mod security {
                pub mod category;
                pub mod injection;
                pub mod rate_limit;
                pub mod xss;
            }
        }
        pub mod runner {
            pub mod execute;
            pub mod report;
            pub mod suite;
        }
    }
}

pub mod shell;
