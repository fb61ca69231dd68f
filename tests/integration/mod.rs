mod helpers;
mod test_check;
mod test_commit;
mod test_release;
