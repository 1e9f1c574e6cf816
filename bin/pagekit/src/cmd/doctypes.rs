//! Doctypes command - lists the known doctype keys

use pagekit_core::Doctype;

/// Run the doctypes command.
pub fn run() {
    for doctype in Doctype::ALL {
        println!("{:<20} {}", doctype.key(), doctype.declaration());
    }
}
