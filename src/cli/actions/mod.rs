pub mod run;

use secrecy::SecretString;

/// Flow requested on the command line.
#[derive(Debug)]
pub enum Action {
    SignIn {
        email: String,
        password: SecretString,
    },
    SignUp {
        email: String,
        password: SecretString,
    },
    Recover {
        email: String,
    },
}
