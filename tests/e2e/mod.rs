// End-to-end tests for the docspeak client
//
// Each test starts a stub of the conversion backend on an ephemeral port and
// wires a real ConversionService to it, with a recording player standing in
// for the external audio binary. The tests drive the service the way the CLI
// does and assert on the wire traffic the stub records.
//
// Architecture:
// - One stub backend per test, 127.0.0.1:0, state behind a parking_lot Mutex
// - The real BackendClient talks to the stub over HTTP
// - RecordingPlayer captures playback URLs instead of spawning a player
// - Downloads land in a per-test temp directory that is removed on drop

mod helpers;
mod test_fetch;
mod test_listen;
