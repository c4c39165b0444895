use std::sync::Arc;

use tracing::{error, info};

use crate::client::Connection;
use crate::protocol::{self, Command, Message};
use crate::server::registry::ConnectedClients;
use crate::services::{TopicsService, User, UserService};
use crate::utils::error::StoreError;

const HELP: &str = "Available commands:\n\
  help - show this help\n\
  register <username> <password> - create an account and log in\n\
  login <username> <password> - log in\n\
  logout - log out\n\
  list-topics - list all topics\n\
  create-topic <name> - create a topic and join it\n\
  join <name> - join a topic\n\
  leave <name> - leave a topic\n\
  say <topic> <message> - send a message to everyone in a topic\n\
  mp <username> <message> - send a private message";

/// Everything one command produces: an optional direct reply to the
/// caller plus messages for other connections. The outer loop transmits
/// both; handlers never write to a socket themselves.
#[derive(Debug, Default)]
pub struct Dispatch {
    pub reply: Option<Message>,
    pub sends: Vec<(Connection, Message)>,
}

impl Dispatch {
    fn reply(message: Message) -> Self {
        Self {
            reply: Some(message),
            sends: Vec::new(),
        }
    }

    fn nothing() -> Self {
        Self::default()
    }
}

/// Per-connection command dispatcher.
///
/// Holds the authenticated user (if any) for the lifetime of one
/// connection and validates every command against the shared registry
/// and stores. Precondition failures are answered with error messages;
/// only store breakage is treated as an actual error.
pub struct ClientHandler {
    conn: Connection,
    user: Option<User>,
    clients: Arc<ConnectedClients>,
    users: UserService,
    topics: TopicsService,
}

impl ClientHandler {
    pub fn new(
        conn: Connection,
        clients: Arc<ConnectedClients>,
        users: UserService,
        topics: TopicsService,
    ) -> Self {
        Self {
            conn,
            user: None,
            clients,
            users,
            topics,
        }
    }

    /// The authenticated user, if this connection has logged in.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Parse one raw input line, execute it, and transmit the outcome.
    /// Empty input does nothing at all.
    pub fn handle_line(&mut self, line: &str) {
        let dispatch = match protocol::prepare(line) {
            None => return,
            Some(Err(e)) => Dispatch::reply(Message::error(e.to_string())),
            Some(Ok(command)) => self.dispatch(&command),
        };

        if let Some(reply) = &dispatch.reply {
            self.conn.send(reply);
        }
        for (conn, message) in &dispatch.sends {
            conn.send(message);
        }
    }

    /// Execute a parsed command against shared state.
    pub fn dispatch(&mut self, command: &Command) -> Dispatch {
        let result = match command.name.as_str() {
            "help" => Ok(Dispatch::reply(Message::info(HELP))),
            "register" => self.handle_register(&command.arguments[0], &command.arguments[1]),
            "login" => self.handle_login(&command.arguments[0], &command.arguments[1]),
            "logout" => self.handle_logout(),
            "list-topics" => self.handle_list_topics(),
            "create-topic" => self.handle_create_topic(&command.arguments[0]),
            "join" => self.handle_join(&command.arguments[0]),
            "leave" => self.handle_leave(&command.arguments[0]),
            "say" => self.handle_say(&command.arguments[0], &command.arguments[1]),
            "mp" => self.handle_mp(&command.arguments[0], &command.arguments[1]),
            other => {
                // The parser only emits names it knows.
                Ok(Dispatch::reply(Message::error(format!(
                    "command not found: {other}"
                ))))
            }
        };

        match result {
            Ok(dispatch) => dispatch,
            Err(e) => {
                error!("store failure while handling {}: {e}", command.name);
                Dispatch::reply(Message::error("Internal server error, try again later"))
            }
        }
    }

    /// Called by the transport when the connection closes; drops the
    /// session's registry entry so broadcasts stop targeting it.
    pub fn disconnect(&mut self) {
        if let Some(user) = self.user.take() {
            self.clients.remove(&user.id);
            info!("{} disconnected", user.username);
        }
    }

    /// Bind a freshly authenticated user to this connection, replacing
    /// any session this connection already had.
    fn log_in(&mut self, user: User) {
        if let Some(previous) = self.user.take() {
            self.clients.remove(&previous.id);
        }
        self.clients.add(user.clone(), self.conn.clone());
        info!("{} logged in", user.username);
        self.user = Some(user);
    }

    fn handle_register(&mut self, username: &str, password: &str) -> Result<Dispatch, StoreError> {
        if self.users.exists(username)? {
            return Ok(Dispatch::reply(Message::error(format!(
                "Username {username} is already taken"
            ))));
        }

        let user = User::new(username, password);
        self.users.create(&user)?;
        self.log_in(user);

        Ok(Dispatch::reply(Message::info(format!(
            "Account {username} created, you are now logged in"
        ))))
    }

    fn handle_login(&mut self, username: &str, password: &str) -> Result<Dispatch, StoreError> {
        match self.users.get_by_username(username)? {
            Some(user) if user.password == password => {
                self.log_in(user);
                Ok(Dispatch::reply(Message::info(format!(
                    "Logged in as {username}"
                ))))
            }
            _ => Ok(Dispatch::reply(Message::error(
                "Invalid username or password",
            ))),
        }
    }

    fn handle_logout(&mut self) -> Result<Dispatch, StoreError> {
        match self.user.take() {
            Some(user) => {
                self.clients.remove(&user.id);
                info!("{} logged out", user.username);
                Ok(Dispatch::reply(Message::info("Logged out")))
            }
            None => Ok(Dispatch::reply(Message::error("You are not logged in"))),
        }
    }

    fn handle_list_topics(&mut self) -> Result<Dispatch, StoreError> {
        let names = self.topics.list()?;
        let content = if names.is_empty() {
            "No topics yet, create one with: create-topic <name>".to_string()
        } else {
            format!("Topics: {}", names.join(", "))
        };
        Ok(Dispatch::reply(Message::info(content)))
    }

    fn handle_create_topic(&mut self, name: &str) -> Result<Dispatch, StoreError> {
        let Some(user) = self.user.as_mut() else {
            return Ok(Dispatch::reply(Message::error(
                "You must be logged in to create topics",
            )));
        };

        if self.topics.exists(name)? {
            return Ok(Dispatch::reply(Message::error(format!(
                "Topic {name} already exists, consider joining it."
            ))));
        }

        self.topics.create(name)?;

        // Creating implies joining.
        user.topics.insert(name.to_string());
        self.users.update(user)?;
        self.clients.update_user(user);

        Ok(Dispatch::reply(Message::info(format!(
            "Topic {name} created and joined."
        ))))
    }

    fn handle_join(&mut self, name: &str) -> Result<Dispatch, StoreError> {
        let Some(user) = self.user.as_mut() else {
            return Ok(Dispatch::reply(Message::error(
                "You must be logged in to join a topic",
            )));
        };

        if !self.topics.exists(name)? {
            return Ok(Dispatch::reply(Message::error(format!(
                "Topic {name} does not exist, you can create it with: create-topic {name}"
            ))));
        }

        // Membership is a set, so joining twice is harmless.
        user.topics.insert(name.to_string());
        self.users.update(user)?;
        self.clients.update_user(user);

        Ok(Dispatch::reply(Message::info(format!("Joined topic {name}"))))
    }

    fn handle_leave(&mut self, name: &str) -> Result<Dispatch, StoreError> {
        let Some(user) = self.user.as_mut() else {
            return Ok(Dispatch::reply(Message::error(
                "You must be logged in to leave a topic",
            )));
        };

        if !self.topics.exists(name)? {
            return Ok(Dispatch::reply(Message::error(format!(
                "Topic {name} does not exist, you can create it with: create-topic {name}"
            ))));
        }

        // Leaving a topic the user never joined is a no-op, not an error.
        user.topics.remove(name);
        self.users.update(user)?;
        self.clients.update_user(user);

        Ok(Dispatch::reply(Message::info(format!("Left topic {name}"))))
    }

    fn handle_say(&mut self, topic: &str, text: &str) -> Result<Dispatch, StoreError> {
        let Some(user) = self.user.as_ref() else {
            return Ok(Dispatch::reply(Message::error(
                "You must be logged in to say something",
            )));
        };

        if !self.topics.exists(topic)? {
            return Ok(Dispatch::reply(Message::error(format!(
                "Topic {topic} does not exist, you can create it with: create-topic {topic}"
            ))));
        }

        if !user.topics.contains(topic) {
            return Ok(Dispatch::reply(Message::error(format!(
                "You cannot send messages in {topic} since you haven't joined it, \
                 you can join it with: join {topic}"
            ))));
        }

        let broadcast = Message::chat(format!("[{}@{topic}] - {text}", user.username));

        // Every connected member gets a copy, the sender included.
        let sends = self
            .clients
            .snapshot()
            .into_iter()
            .filter(|(member, _)| member.topics.contains(topic))
            .map(|(_, conn)| (conn, broadcast.clone()))
            .collect();

        Ok(Dispatch {
            reply: None,
            sends,
        })
    }

    fn handle_mp(&mut self, username: &str, text: &str) -> Result<Dispatch, StoreError> {
        let Some(sender) = self.user.as_ref() else {
            return Ok(Dispatch::reply(Message::error(
                "You must be logged in to send private messages",
            )));
        };

        // Usernames are unique among connected clients, so the first
        // match is the only one.
        if let Some((_, conn)) = self.clients.find_by_username(username) {
            return Ok(Dispatch {
                reply: Some(Message::chat(format!("[To: {username}] - {text}"))),
                sends: vec![(
                    conn,
                    Message::chat(format!("[From: {}] - {text}", sender.username)),
                )],
            });
        }

        if self.users.get_by_username(username)?.is_none() {
            return Ok(Dispatch::reply(Message::error(format!(
                "No user found with username \"{username}\""
            ))));
        }

        // TODO: queue the message for offline delivery once message
        // storage lands; for now a known-but-offline receiver gets nothing.
        Ok(Dispatch::nothing())
    }
}
