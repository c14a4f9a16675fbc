mod helpers;
mod validation;
