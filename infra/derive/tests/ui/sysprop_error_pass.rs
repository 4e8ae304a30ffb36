use std::borrow::Cow;
use sysprop_derive::sysprop_error;

#[sysprop_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<()> {
    let io: std::result::Result<(), std::io::Error> =
        Err(std::io::Error::other("disk unplugged"));
    io.context("Reading properties")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (Reading properties): disk unplugged");

    let rejected: Result<()> =
        Err(DemoError::Rejected { message: "no".into(), context: None });
    let err = rejected.context("Building").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (Building): no");

    let internal: DemoError = "boom".into();
    assert!(matches!(internal, DemoError::Internal { .. }));
}
