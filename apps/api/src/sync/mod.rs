// Offline sync: replays progress changes recorded while the client was offline.

pub mod handlers;
