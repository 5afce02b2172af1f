use crate::types::{Address, Checkpoint, Submission};
use futures::{
    channel::{mpsc, oneshot},
    SinkExt,
};

/// Message sent to the [super::Actor].
pub enum Message {
    SetCheckpoint {
        submission: Submission,
        response: oneshot::Sender<bool>,
    },
    Latest {
        response: oneshot::Sender<Checkpoint>,
    },
    Admins {
        response: oneshot::Sender<Vec<Address>>,
    },
}

/// Handle used to interact with a running [super::Actor].
#[derive(Clone)]
pub struct Mailbox {
    sender: mpsc::Sender<Message>,
}

impl Mailbox {
    pub(super) fn new(sender: mpsc::Sender<Message>) -> Self {
        Self { sender }
    }

    /// Attempt to advance the oracle with `submission`.
    ///
    /// Returns `true` if the submission was accepted.
    pub async fn set_checkpoint(&mut self, submission: Submission) -> bool {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(Message::SetCheckpoint {
                submission,
                response,
            })
            .await
            .expect("Failed to send set checkpoint");
        receiver.await.expect("Failed to receive set checkpoint")
    }

    /// Returns the latest accepted [Checkpoint].
    pub async fn latest(&mut self) -> Checkpoint {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(Message::Latest { response })
            .await
            .expect("Failed to send latest");
        receiver.await.expect("Failed to receive latest")
    }

    /// Returns all administrators.
    pub async fn admins(&mut self) -> Vec<Address> {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(Message::Admins { response })
            .await
            .expect("Failed to send admins");
        receiver.await.expect("Failed to receive admins")
    }
}
