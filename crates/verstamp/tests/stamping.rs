use verstamp::Version;

// Stamping is first-write-wins process-global state, so this test binary
// holds exactly one test.
#[test]
fn stamped_version_wins_over_the_build_default() {
    verstamp::embed::embed("1.2.3");

    assert_eq!(verstamp::get_version(), "1.2.3");
    assert_eq!(Version::current().unwrap(), Version::new(1, 2, 3));

    // later writers lose
    verstamp::embed::__set_version("9.9.9");
    assert_eq!(verstamp::get_version(), "1.2.3");
}
