//! 双语字符串表
//!
//! 静态的 en/ru 字典，键按 `命名空间.键` 组织（如 `test.next`）。
//! 查找顺序：当前语言 -> 英语 -> 键本身。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ru];

    /// 解析语言标签，如 `ru`、`ru-RU`、`en_US`，未知语言回退到英语
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ru" => Locale::Ru,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// 切换到另一种语言
    pub fn toggled(&self) -> Self {
        match self {
            Locale::En => Locale::Ru,
            Locale::Ru => Locale::En,
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => EN,
            Locale::Ru => RU,
        }
    }
}

/// 翻译函数
pub fn t(locale: Locale, key: &'static str) -> &'static str {
    translate(locale, key)
}

/// 运行时键的翻译（例如状态里保存的错误键），未知键原样返回
pub fn translate<'a>(locale: Locale, key: &'a str) -> &'a str {
    lookup(locale.table(), key)
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

// =========================================================
// English
// =========================================================

const EN: &[(&str, &str)] = &[
    ("app.name", "MentorAI"),
    ("app.loading", "Loading..."),
    ("app.not_found", "Page not found"),
    ("app.language", "Language"),
    // landing
    ("landing.title", "Stop Guessing."),
    ("landing.subtitle", "Know Your True Code Level."),
    (
        "landing.description",
        "Analyze your code, discover your real skill level, and get a personalized roadmap to land your dream job or build your startup.",
    ),
    ("landing.get_started", "Get Started"),
    ("landing.login", "Login"),
    ("landing.how_it_works", "How it Works"),
    ("landing.features.analysis", "Deep Analysis"),
    ("landing.features.roadmap", "Tailored Roadmap"),
    ("landing.features.projects", "Portfolio Ideas"),
    // login
    ("login.title", "Welcome Back"),
    ("login.username", "Username"),
    ("login.password", "Password"),
    ("login.submit", "Log In"),
    ("login.invalid", "Invalid credentials"),
    ("login.no_account", "Don't have an account?"),
    ("login.register", "Register"),
    // register
    ("register.title", "Create Account"),
    ("register.username", "Username"),
    ("register.email", "Email"),
    ("register.password", "Password"),
    ("register.age", "Age"),
    ("register.track", "Track"),
    ("register.track_backend", "Backend (Python)"),
    ("register.track_frontend", "Frontend (JavaScript)"),
    ("register.goal", "Goal"),
    ("register.goal_job", "Get a Job"),
    ("register.goal_freelance", "Freelance"),
    ("register.goal_startup", "Build Startup"),
    ("register.submit", "Sign Up"),
    ("register.failed", "Registration failed"),
    ("register.have_account", "Already have an account?"),
    // dashboard
    ("dashboard.title", "Choose Your Path"),
    ("dashboard.subtitle", "Select a programming language to test your knowledge"),
    ("dashboard.start_test", "Start Test"),
    ("dashboard.code_analysis", "Or Analyze Existing Code"),
    ("dashboard.paste_code", "Paste your code here..."),
    ("dashboard.analyze", "Analyze Code"),
    ("dashboard.analyze_failed", "Analysis failed. Please try again."),
    ("dashboard.select_lang", "Select Language"),
    ("dashboard.welcome", "Welcome back"),
    ("dashboard.my_course", "My Course"),
    ("dashboard.continue", "Continue Learning"),
    ("dashboard.progress", "Progress"),
    ("dashboard.homework", "Homework"),
    ("dashboard.chat", "Ask the Mentor"),
    ("dashboard.logout", "Logout"),
    ("dashboard.track_failed", "Could not switch track."),
    // test
    ("test.question", "Question"),
    ("test.next", "Next"),
    ("test.submit", "Submit Test"),
    ("test.progress", "Progress"),
    ("test.assessment", "Assessment"),
    ("test.no_questions_title", "No Questions"),
    (
        "test.no_questions",
        "We don't have questions for this language yet. Please try another language.",
    ),
    ("test.load_failed", "Failed to load questions. Please try again."),
    ("test.submit_failed", "Failed to submit test. Please try again."),
    ("test.error", "Error"),
    ("test.back", "Back to Dashboard"),
    ("test.child_next", "NEXT QUEST!"),
    ("test.child_submit", "SHOW MAGIC!"),
    // results
    ("results.title", "Analysis Results"),
    ("results.level", "Your Level"),
    ("results.roadmap", "Your Roadmap"),
    ("results.projects", "Recommended Projects"),
    ("results.tasks", "Practical Tasks"),
    ("results.score", "Score"),
    ("results.new_analysis", "New Analysis"),
    ("results.no_data", "No recent analysis found."),
    ("results.go_dashboard", "Go to Dashboard"),
    ("results.hero", "YOU ARE A HERO!"),
    ("results.score_card", "SCORE CARD"),
    ("results.magic_points", "MAGIC POINTS"),
    ("results.adventure_map", "MY ADVENTURE MAP!"),
    ("results.fun_quests", "FUN QUESTS!"),
    ("results.my_game", "MY GAME!"),
    ("results.super_results", "Super Results!"),
    ("results.home", "HOME"),
    ("results.finished_all", "You've finished everything! Amazing! ✨"),
    // course
    ("course.more_levels", "More levels coming soon!"),
    ("course.empty", "This course has no lessons yet."),
    ("course.load_failed", "Failed to load the course."),
    ("course.lesson_failed", "Failed to load the lesson."),
    ("course.locked", "This lesson is locked."),
    ("course.back_to_map", "Back to Map"),
    ("course.step", "Step"),
    ("course.task", "Task"),
    ("course.repeat_code", "Type this code to continue:"),
    ("course.repeat_mismatch", "The code does not match. Check it carefully."),
    ("course.next_step", "Continue"),
    ("course.run_code", "Run Code"),
    ("course.checking", "Checking..."),
    ("course.check_failed", "Failed to check solution"),
    ("course.passed", "Success!"),
    ("course.not_passed", "Not quite..."),
    ("course.attempts", "Attempts"),
    ("course.show_solution", "Show Solution"),
    ("course.solution", "Solution"),
    ("course.completed", "Lesson completed!"),
    ("course.complete_failed", "Could not save your progress."),
    ("course.finish", "See Course Report"),
    // completion
    ("completion.title", "Course Completed!"),
    (
        "completion.fallback",
        "## Completion Confirmed.\n\nCould not generate AI report at this time, but you have successfully finished the course!",
    ),
    ("completion.back", "Back to Courses"),
    // homework
    ("homework.your_tasks", "Active Assignments"),
    ("homework.mentor_task", "AI Mentor Challenge"),
    ("homework.placeholder", "// Write your code here..."),
    ("homework.submit", "Check with Mentor"),
    ("homework.passed", "Challenge Passed!"),
    ("homework.failed", "Needs Improvement"),
    ("homework.master_solution", "Master Solution & Deep Explanation"),
    (
        "homework.note",
        "Note: Use this solution to understand the concepts and move forward!",
    ),
    ("homework.empty", "No assignments yet."),
    ("homework.load_failed", "Failed to load assignments."),
    ("homework.submit_failed", "Could not submit your solution. Please try again."),
    // chat
    ("chat.title", "AI Mentor Pro"),
    ("chat.title_child", "Smart Mentor"),
    (
        "chat.welcome",
        "Welcome. I'm here to help with your code and concepts. What's on your mind?",
    ),
    (
        "chat.welcome_child",
        "Hi, little genius! Ask me anything about the lesson! 🚀",
    ),
    ("chat.placeholder", "Ask your mentor..."),
    ("chat.placeholder_child", "Write a question..."),
    ("chat.thinking", "Thinking..."),
    ("chat.unavailable", "Sorry, I can't answer right now. Please try again later! 🛠️"),
    ("chat.back", "Back"),
];

// =========================================================
// Русский
// =========================================================

const RU: &[(&str, &str)] = &[
    ("app.loading", "Загрузка..."),
    ("app.not_found", "Страница не найдена"),
    ("app.language", "Язык"),
    // landing
    ("landing.title", "Хватит гадать."),
    ("landing.subtitle", "Узнай свой реальный уровень."),
    (
        "landing.description",
        "Проанализируй свой код, узнай свой истинный уровень и получи персональную дорожную карту для работы мечты или стартапа.",
    ),
    ("landing.get_started", "Начать"),
    ("landing.login", "Войти"),
    ("landing.how_it_works", "Как это работает"),
    ("landing.features.analysis", "Глубокий анализ"),
    ("landing.features.roadmap", "Персональная карта"),
    ("landing.features.projects", "Идеи для портфолио"),
    // login
    ("login.title", "С возвращением"),
    ("login.username", "Имя пользователя"),
    ("login.password", "Пароль"),
    ("login.submit", "Войти"),
    ("login.invalid", "Неверные учетные данные"),
    ("login.no_account", "Нет аккаунта?"),
    ("login.register", "Зарегистрироваться"),
    // register
    ("register.title", "Создать аккаунт"),
    ("register.username", "Имя пользователя"),
    ("register.email", "Email"),
    ("register.password", "Пароль"),
    ("register.age", "Возраст"),
    ("register.track", "Направление"),
    ("register.track_backend", "Бэкенд (Python)"),
    ("register.track_frontend", "Фронтенд (JavaScript)"),
    ("register.goal", "Цель"),
    ("register.goal_job", "Найти работу"),
    ("register.goal_freelance", "Фриланс"),
    ("register.goal_startup", "Свой стартап"),
    ("register.submit", "Зарегистрироваться"),
    ("register.failed", "Не удалось зарегистрироваться"),
    ("register.have_account", "Уже есть аккаунт?"),
    // dashboard
    ("dashboard.title", "Выбери свой путь"),
    (
        "dashboard.subtitle",
        "Выбери язык программирования, чтобы проверить свои знания",
    ),
    ("dashboard.start_test", "Начать тест"),
    ("dashboard.code_analysis", "Или проанализируй готовый код"),
    ("dashboard.paste_code", "Вставь свой код здесь..."),
    ("dashboard.analyze", "Проанализировать код"),
    ("dashboard.analyze_failed", "Анализ не удался. Попробуй еще раз."),
    ("dashboard.select_lang", "Выбери язык"),
    ("dashboard.welcome", "С возвращением"),
    ("dashboard.my_course", "Мой курс"),
    ("dashboard.continue", "Продолжить обучение"),
    ("dashboard.progress", "Прогресс"),
    ("dashboard.homework", "Домашние задания"),
    ("dashboard.chat", "Спросить наставника"),
    ("dashboard.logout", "Выйти"),
    ("dashboard.track_failed", "Не удалось сменить направление."),
    // test
    ("test.question", "Вопрос"),
    ("test.next", "Далее"),
    ("test.submit", "Завершить тест"),
    ("test.progress", "Прогресс"),
    ("test.assessment", "Тестирование"),
    ("test.no_questions_title", "Нет вопросов"),
    (
        "test.no_questions",
        "К сожалению, мы еще не добавили вопросы для этого языка. Попробуйте другой!",
    ),
    ("test.load_failed", "Не удалось загрузить вопросы. Попробуйте еще раз."),
    ("test.submit_failed", "Не удалось отправить тест. Попробуйте еще раз."),
    ("test.error", "Ошибка"),
    ("test.back", "Вернуться на главную"),
    ("test.child_next", "СЛЕДУЮЩИЙ КВЕСТ!"),
    ("test.child_submit", "ПОКАЖИ МАГИЮ!"),
    // results
    ("results.title", "Результаты анализа"),
    ("results.level", "Твой уровень"),
    ("results.roadmap", "Дорожная карта"),
    ("results.projects", "Рекомендуемые проекты"),
    ("results.tasks", "Практические задания"),
    ("results.score", "Баллы"),
    ("results.new_analysis", "Новый анализ"),
    ("results.no_data", "Недавний анализ не найден."),
    ("results.go_dashboard", "На главную"),
    ("results.hero", "ТЫ ГЕРОЙ!"),
    ("results.score_card", "КАРТОЧКА"),
    ("results.magic_points", "МАГИЧЕСКИЕ ОЧКИ"),
    ("results.adventure_map", "КАРТА ПРИКЛЮЧЕНИЙ!"),
    ("results.fun_quests", "ВЕСЕЛЫЕ ЗАДАНИЯ!"),
    ("results.my_game", "МОЯ ИГРА!"),
    ("results.super_results", "Супер Результаты!"),
    ("results.home", "ДОМОЙ"),
    ("results.finished_all", "Ты всё выполнил! Невероятно! ✨"),
    // course
    ("course.more_levels", "Скоро новые уровни!"),
    ("course.empty", "В этом курсе пока нет уроков."),
    ("course.load_failed", "Не удалось загрузить курс."),
    ("course.lesson_failed", "Не удалось загрузить урок."),
    ("course.locked", "Этот урок пока закрыт."),
    ("course.back_to_map", "К карте"),
    ("course.step", "Шаг"),
    ("course.task", "Задача"),
    ("course.repeat_code", "Повтори этот код, чтобы продолжить:"),
    ("course.repeat_mismatch", "Код не совпадает. Проверь внимательно."),
    ("course.next_step", "Дальше"),
    ("course.run_code", "Запустить"),
    ("course.checking", "Проверяем..."),
    ("course.check_failed", "Не удалось проверить решение"),
    ("course.passed", "Отлично!"),
    ("course.not_passed", "Почти..."),
    ("course.attempts", "Попытки"),
    ("course.show_solution", "Показать решение"),
    ("course.solution", "Решение"),
    ("course.completed", "Урок пройден!"),
    ("course.complete_failed", "Не удалось сохранить прогресс."),
    ("course.finish", "Отчет по курсу"),
    // completion
    ("completion.title", "Курс пройден!"),
    (
        "completion.fallback",
        "## Завершение подтверждено.\n\nНе удалось сгенерировать отчет, но ты успешно прошел курс!",
    ),
    ("completion.back", "К курсам"),
    // homework
    ("homework.your_tasks", "Активные задания"),
    ("homework.mentor_task", "Задание от AI-наставника"),
    ("homework.placeholder", "// Напиши свой код здесь..."),
    ("homework.submit", "Проверить у наставника"),
    ("homework.passed", "Задание выполнено!"),
    ("homework.failed", "Нужно доработать"),
    ("homework.master_solution", "Эталонное решение и разбор"),
    (
        "homework.note",
        "Используй это решение, чтобы разобраться в теме и двигаться дальше!",
    ),
    ("homework.empty", "Заданий пока нет."),
    ("homework.load_failed", "Не удалось загрузить задания."),
    ("homework.submit_failed", "Не удалось отправить решение. Попробуй еще раз."),
    // chat
    ("chat.title", "AI Наставник"),
    ("chat.title_child", "Умный наставник"),
    (
        "chat.welcome",
        "Здравствуй. Я помогу с кодом и концепциями. Что тебя интересует?",
    ),
    (
        "chat.welcome_child",
        "Привет, маленький гений! Задай мне любой вопрос по уроку! 🚀",
    ),
    ("chat.placeholder", "Спроси наставника..."),
    ("chat.placeholder_child", "Напиши вопрос..."),
    ("chat.thinking", "Думаю..."),
    ("chat.unavailable", "Извини, я временно не могу ответить. Попробуй позже! 🛠️"),
    ("chat.back", "Назад"),
];
