mod add_app;
mod game;
