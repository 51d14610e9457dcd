mod redirect;

pub use redirect::resolve;
